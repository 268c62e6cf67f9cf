// ABOUTME: Shared helpers for FitFam integration tests
// ABOUTME: Re-exports the in-process HTTP request builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

pub mod axum_test;
