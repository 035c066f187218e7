//! Tests for the group resolution module.
//!
//! Organized by functionality:
//! - Sequential expansion (pagination, cycles, one-level mode)
//! - Concurrent fan-out (seeds, diamond dedup, first-error cancellation)
//! - Facade strategy selection and allow-list filtering
//! - Sequential/concurrent agreement over generated graphs

mod mocks;
