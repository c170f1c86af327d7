// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

pub mod config;
pub mod filter;
pub mod render;
pub mod status;
pub mod stream;
