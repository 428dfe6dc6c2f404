// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod commands;
pub mod common;

pub use commands::cat::cat_command;
pub use commands::digest::digest_command;
pub use commands::lines::lines_command;
pub use commands::link::link_command;
pub use commands::rm::rm_command;
pub use commands::stat::stat_command;
pub use commands::watch::watch_command;
pub use commands::write::write_command;
