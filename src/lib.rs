//! # asyncpp
//!
//! Rewrites a small async/await extension of C++ into plain C++ built on
//! `std::future` and `std::async`.
//!
//! ```text
//! async int foo(int num) { return 1; }
//! int v = await foo(2);
//! ```
//!
//! becomes
//!
//! ```text
//! std::future<int> foo(int num) { return std::async([=](){
//! return 1;
//! }); }
//!
//! int v = foo(2).get();
//! ```
//!
//! The rewrite happens in two grammar-driven phases, see
//! [`asyncpp::pipeline`]. The generated code blocks on `.get()` and runs each
//! async call on its own `std::async` task: there is no scheduler, no
//! cancellation and no bound on the number of threads.

pub mod asyncpp;

pub use asyncpp::pipeline::{convert, ConvertError, Converter};
