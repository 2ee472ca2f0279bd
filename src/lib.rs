// src/lib.rs

//! BioNet PCT dataset sync library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
