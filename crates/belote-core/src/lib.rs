#![deny(warnings)]
pub mod belief;
pub mod game;
pub mod model;
pub mod rules;
