//! Middleware
//!
//! Este módulo contiene los middlewares HTTP de la aplicación.

pub mod cors;
