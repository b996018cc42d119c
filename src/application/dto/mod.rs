// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义 HTTP 请求参数，使用 validator 校验取值范围
pub mod forecast_request;
pub mod lifecycle_request;
