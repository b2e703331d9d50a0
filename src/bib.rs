// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

pub mod cite;
pub mod metadata;
pub mod record;
