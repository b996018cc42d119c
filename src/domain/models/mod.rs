// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 告警（alert）：容量阈值被越过时产生的通知
/// - 看板（board）：看板身份与成员容量档案（外部只读数据）
/// - 预测（forecast）：资源在预测周期内的负载预测
/// - 建议（recommendation）：推迟或重新分配任务的再平衡建议
/// - 工作项（work_item）：看板上的任务卡片（外部只读数据）
pub mod alert;
pub mod board;
pub mod forecast;
pub mod recommendation;
pub mod work_item;
