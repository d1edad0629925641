pub mod command;
pub mod decode;
pub mod info;
pub mod progress;
pub mod sink;
