pub mod cluster;
pub mod pods;
