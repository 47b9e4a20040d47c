//! Backend de registro de asistencia para transporte de pasajeros
//!
//! Tres componentes sobre un store de documentos en tiempo real:
//! el roster de pasajeros (CRUD + índice código → id), el directorio de
//! rutas (solo lectura) y la estación de registro (resolver código,
//! validar y anexar asistencia por día y ruta).

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;

pub use state::AppState;
