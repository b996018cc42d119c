// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 告警确认/解决请求
#[derive(Debug, Deserialize, Serialize)]
pub struct AlertActionDto {
    /// 执行操作的成员
    pub actor: Uuid,
}

/// 实施建议请求
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct ImplementRecommendationDto {
    /// 实际采取的操作说明
    #[validate(length(max = 2000))]
    pub note: Option<String>,
}
