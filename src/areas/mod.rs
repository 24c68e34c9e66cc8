//! Core repository components
//!
//! This module contains the building blocks of a local Maven-layout repository:
//!
//! - `artifact_store`: archives, descriptors and their checksum sidecars
//! - `metadata`: per-package `maven-metadata.xml` version index
//! - `repository`: high-level repository handle and coordination

pub mod artifact_store;
pub mod metadata;
pub mod repository;
