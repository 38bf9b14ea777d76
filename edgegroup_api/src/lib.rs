// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

pub mod endpoint;
pub mod local_resource;
pub mod participant;
pub mod subscription;
