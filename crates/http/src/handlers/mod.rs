#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod api;
pub mod export;
pub mod names;
pub mod pages;
pub mod search;
