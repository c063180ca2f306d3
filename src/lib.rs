// src/lib.rs

//! LUMIRA Research Pipeline Library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod services;
pub mod utils;
