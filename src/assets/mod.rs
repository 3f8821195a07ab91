//! Asset resolution: logical template paths to deliverable URLs.
//!
//! Templates reference assets by logical source path (`main.ts`,
//! `src/css/app.css`). What URL that turns into depends on the environment:
//! in development the URL points at the live Vite dev server, in production
//! it points at a content-hashed artifact recorded in the build manifest.
//! The [`AssetManager`] façade hides that difference behind a cached lookup.

mod error;
mod kind;
mod manager;
mod manifest;
mod resolver;
mod tree;

pub use error::AssetError;
pub use kind::AssetType;
pub use manager::AssetManager;
pub use manifest::{Manifest, ManifestEntry};
pub use resolver::{AssetResolver, DevResolver, ProdResolver};
pub use tree::OutputTree;
