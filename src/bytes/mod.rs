pub mod units;

const KIBIBYTE: u64 = 0x400;
const MEBIBYTE: u64 = 0x100000;
const GIBIBYTE: u64 = 0x40000000;

const K: &str = "K";
const M: &str = "M";
const G: &str = "G";
