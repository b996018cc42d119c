// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// 告警和建议的外部状态流转
pub mod lifecycle_use_case;
