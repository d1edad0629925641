pub mod options;
pub mod output;
pub mod sample;
pub mod wav;
pub mod word;
