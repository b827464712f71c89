#![allow(dead_code)]

pub mod config;
pub mod mock_polly;
pub mod mock_s3;
pub mod server;
