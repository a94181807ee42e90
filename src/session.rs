//! Signed-in user context and role permissions.
//!
//! A [`Session`] is created explicitly on sign-in and passed to whatever needs
//! it; there is no process-wide current user.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Manager,
    Staff,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "staff" => Ok(Role::Staff),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    InventoryView,
    InventoryCreate,
    InventoryEdit,
    InventoryDelete,
    InventoryQr,
    OrdersView,
    OrdersCreate,
    OrdersEdit,
    OrdersDelete,
    UsersView,
    UsersCreate,
    UsersEdit,
    UsersDelete,
    StaffView,
    StaffCreate,
    StaffEdit,
    StaffDelete,
    TasksViewAll,
    TasksViewOwn,
    TasksUpdateStatus,
    TasksAssign,
    TasksEdit,
    TasksDelete,
    ReportsView,
    AiView,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::InventoryView => "inventory.view",
            Permission::InventoryCreate => "inventory.create",
            Permission::InventoryEdit => "inventory.edit",
            Permission::InventoryDelete => "inventory.delete",
            Permission::InventoryQr => "inventory.qr",
            Permission::OrdersView => "orders.view",
            Permission::OrdersCreate => "orders.create",
            Permission::OrdersEdit => "orders.edit",
            Permission::OrdersDelete => "orders.delete",
            Permission::UsersView => "users.view",
            Permission::UsersCreate => "users.create",
            Permission::UsersEdit => "users.edit",
            Permission::UsersDelete => "users.delete",
            Permission::StaffView => "staff.view",
            Permission::StaffCreate => "staff.create",
            Permission::StaffEdit => "staff.edit",
            Permission::StaffDelete => "staff.delete",
            Permission::TasksViewAll => "tasks.view.all",
            Permission::TasksViewOwn => "tasks.view.own",
            Permission::TasksUpdateStatus => "tasks.update.status",
            Permission::TasksAssign => "tasks.assign",
            Permission::TasksEdit => "tasks.edit",
            Permission::TasksDelete => "tasks.delete",
            Permission::ReportsView => "reports.view",
            Permission::AiView => "ai.view",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use Permission::*;

const ADMIN: &[Permission] = &[
    InventoryView, InventoryCreate, InventoryEdit, InventoryDelete, InventoryQr,
    OrdersView, OrdersCreate, OrdersEdit, OrdersDelete,
    UsersView, UsersCreate, UsersEdit, UsersDelete,
    TasksViewAll, TasksAssign, TasksEdit, TasksDelete, TasksUpdateStatus,
    ReportsView, AiView,
];

const MANAGER: &[Permission] = &[
    InventoryView, InventoryCreate, InventoryEdit, InventoryDelete, InventoryQr,
    OrdersView, OrdersCreate, OrdersEdit, OrdersDelete,
    UsersView,
    StaffView, StaffCreate, StaffEdit, StaffDelete,
    TasksViewAll, TasksViewOwn, TasksAssign, TasksEdit, TasksDelete,
    ReportsView, AiView,
];

const STAFF: &[Permission] = &[
    InventoryView, InventoryQr,
    OrdersView,
    TasksViewOwn, TasksUpdateStatus,
];

impl Role {
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Admin => ADMIN,
            Role::Manager => MANAGER,
            Role::Staff => STAFF,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: String,
    pub role: Role,
}

impl Session {
    pub fn new(user: impl Into<String>, role: Role) -> Self {
        Self { user: user.into(), role }
    }

    pub fn permissions(&self) -> &'static [Permission] {
        self.role.permissions()
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn has_any(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has(*p))
    }
}
