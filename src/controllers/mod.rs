//! Controllers
//!
//! Orquestación por recurso: mapean DTOs de la API a los servicios y de
//! vuelta.

pub mod checkin_controller;
pub mod passenger_controller;
pub mod trip_controller;
