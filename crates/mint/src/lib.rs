//! # nft-mint
//!
//! Connect a wallet, check its network and mint from an NFT collection.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod app;
pub mod args;
pub mod cmd;
pub mod connection;
pub mod contract;
pub mod error;
pub mod flow;
pub mod handler;
pub mod opts;
pub mod utils;
pub mod view;

pub use app::App;
pub use connection::{ConnectionState, Notice};
pub use contract::{NftContract, PendingMint};
pub use error::MintError;
pub use flow::{MintFlow, MintStatus};
pub use view::{Action, Screen, StatusLine, ViewModel, render};
