//! Nodemaid Core Types and Definitions
//!
//! This crate provides the read-only snapshot types the exporter works on.
//! It includes:
//!
//! - **Identifiers**: String-interned names ([`identifier::Id`])
//! - **Colors**: Custom node colors and their hex form ([`color::NodeColor`])
//! - **Graph**: Nodes, frames, sockets and links ([`graph`] module)
//! - **Scene**: Active object and modifier stacks ([`scene`] module)
//! - **Format**: The output container tag ([`format::ExportFormat`])

pub mod color;
pub mod format;
pub mod graph;
pub mod identifier;
pub mod scene;
