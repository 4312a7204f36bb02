// src/models/mod.rs

pub mod sanitize;
