//! Route modules for Page Server

pub mod documents;
pub mod files;
pub mod health;
pub mod pages;
