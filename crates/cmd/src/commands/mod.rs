// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod cat;
pub mod digest;
pub mod lines;
pub mod link;
pub mod rm;
pub mod stat;
pub mod watch;
pub mod write;
