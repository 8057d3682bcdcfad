#![allow(dead_code)]

pub mod app_builder;
pub mod scripted_store;

pub use app_builder::create_test_app;
pub use scripted_store::{Gate, ScriptedStore, StoreOp};
