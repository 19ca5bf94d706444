// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Amida: an Amidakuji (ghost-leg) lottery for the terminal.
//!
//! Every participant is assigned another participant so that nobody draws themselves. The
//! assignment is either shuffled directly or read off a randomly generated ladder; either way the
//! ladder that is shown traces to exactly the assignment that is revealed.

pub mod config;
pub mod lottery;
pub mod model;
pub mod render;
pub mod report;
pub mod session;
pub mod tui;
