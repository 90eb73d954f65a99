#![allow(dead_code)]

pub mod search;
pub mod utils;
