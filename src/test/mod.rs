//! Whole-application tests, run against the router with in-memory stores.

mod fakes;
mod pages;
