mod calculator;
mod common;
mod ranges;
