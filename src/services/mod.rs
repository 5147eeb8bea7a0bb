// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod anti_bot;
pub mod extractor;
pub mod fetcher;
pub mod logging;
pub mod pipeline;
pub mod resolver;
pub mod validator;
