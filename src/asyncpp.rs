//! Main module for asyncpp library functionality

pub mod ast;
pub mod codegen;
pub mod config;
pub mod formats;
pub mod grammar;
pub mod pipeline;
pub mod selftest;
