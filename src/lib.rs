pub mod archive;
pub mod artifact;
pub mod coordinate;
pub mod error;
pub mod executable;
pub mod process;
pub mod report;
pub mod retrieve;
pub mod runtime;
