// Copyright (c) 2025 Lehua Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! JSON-RPC 2.0 method handlers.
//!
//! `trie.*` exposes the raw engine through the binding; `contacts.*` exposes
//! the name/e-mail directory.

pub mod contacts;
pub mod trie;

pub use contacts::register_contact_methods;
pub use trie::register_trie_methods;
