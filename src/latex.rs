// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

pub mod catalog;
pub mod commands;
pub mod link;
pub mod math;
pub mod pipeline;
pub mod scanner;
pub mod segment;
pub mod text;
