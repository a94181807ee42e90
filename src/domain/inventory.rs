use std::fmt;
use serde::{Deserialize, Serialize};

use crate::actor_framework::Entity;
use crate::domain::loose::{integer_or_zero, number_or_zero, Loose};
use crate::query::{ListQuery, QueryBuilder, SortDirection, ToQuery};

/// Stock status. Wire codes are fixed and non-contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl InventoryStatus {
    pub const ALL: [InventoryStatus; 3] = [
        InventoryStatus::InStock,
        InventoryStatus::LowStock,
        InventoryStatus::OutOfStock,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            InventoryStatus::OutOfStock => "0",
            InventoryStatus::LowStock => "2",
            InventoryStatus::InStock => "5",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "0" => Some(InventoryStatus::OutOfStock),
            "2" => Some(InventoryStatus::LowStock),
            "5" => Some(InventoryStatus::InStock),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InventoryStatus::OutOfStock => "Out of stock",
            InventoryStatus::LowStock => "Low stock",
            InventoryStatus::InStock => "In stock",
        }
    }

    pub fn as_number(&self) -> u8 {
        match self {
            InventoryStatus::OutOfStock => 0,
            InventoryStatus::LowStock => 2,
            InventoryStatus::InStock => 5,
        }
    }
}

impl fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Inventory record as the server sends it; any field but `Id` may be null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InventoryItemDto {
    pub id: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<Loose>,
    #[serde(default)]
    pub unit_price: Option<Loose>,
    #[serde(default)]
    pub qr_code_value: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub status: Option<Loose>,
}

/// Display-safe inventory item.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub id: String,
    pub product_name: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub qr_code_value: String,
    pub image_url: String,
    pub category: String,
    pub location: String,
    pub sku: String,
    /// Wire code, `"0"` when the server omitted it.
    pub status: String,
}

impl InventoryItem {
    pub fn status(&self) -> Option<InventoryStatus> {
        InventoryStatus::from_code(&self.status)
    }

    /// Unknown codes read as out of stock.
    pub fn status_label(&self) -> &'static str {
        self.status().unwrap_or(InventoryStatus::OutOfStock).label()
    }

    /// Full-replacement payload for this item, id included. `None` when the
    /// stored status code is not one the server accepts back.
    pub fn to_payload(&self) -> Option<InventoryItemPayload> {
        let status = self.status()?;
        Some(InventoryItemPayload {
            id: Some(self.id.clone()),
            product_name: self.product_name.clone(),
            description: non_empty(&self.description),
            quantity: self.quantity,
            unit_price: self.unit_price,
            qr_code_value: non_empty(&self.qr_code_value),
            image_url: non_empty(&self.image_url),
            category: self.category.clone(),
            location: self.location.clone(),
            sku: self.sku.clone(),
            status: status.as_number(),
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

impl From<InventoryItemDto> for InventoryItem {
    fn from(dto: InventoryItemDto) -> Self {
        Self {
            id: dto.id,
            product_name: dto.product_name.unwrap_or_default(),
            description: dto.description.unwrap_or_default(),
            quantity: integer_or_zero(dto.quantity.as_ref()),
            unit_price: number_or_zero(dto.unit_price.as_ref()),
            qr_code_value: dto.qr_code_value.unwrap_or_default(),
            image_url: dto.image_url.unwrap_or_default(),
            category: dto.category.unwrap_or_default(),
            location: dto.location.unwrap_or_default(),
            sku: dto.sku.unwrap_or_default(),
            status: dto
                .status
                .map(|s| s.to_code())
                .unwrap_or_else(|| InventoryStatus::OutOfStock.code().to_string()),
        }
    }
}

/// Create/update body. `Id` is omitted on create and echoed on update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InventoryItemPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub category: String,
    pub location: String,
    pub sku: String,
    pub status: u8,
}

impl InventoryItemPayload {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventorySortColumn {
    ProductName,
    Quantity,
    UnitPrice,
    Category,
    Location,
    Sku,
    Status,
}

impl fmt::Display for InventorySortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InventorySortColumn::ProductName => "ProductName",
            InventorySortColumn::Quantity => "Quantity",
            InventorySortColumn::UnitPrice => "UnitPrice",
            InventorySortColumn::Category => "Category",
            InventorySortColumn::Location => "Location",
            InventorySortColumn::Sku => "Sku",
            InventorySortColumn::Status => "Status",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sku: Option<String>,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub status: Option<InventoryStatus>,
    pub order_column: Option<InventorySortColumn>,
    pub order_direction: Option<SortDirection>,
}

impl InventoryListQuery {
    pub fn paged(page: u32, page_size: u32) -> Self {
        Self { page: Some(page), page_size: Some(page_size), ..Self::default() }
    }

    pub fn sorted_by(mut self, column: InventorySortColumn, direction: SortDirection) -> Self {
        self.order_column = Some(column);
        self.order_direction = Some(direction);
        self
    }
}

impl ToQuery for InventoryListQuery {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .param("Page", self.page)
            .param("PageSize", self.page_size)
            .param("Sku", self.sku.as_deref())
            .param("ProductName", self.product_name.as_deref())
            .param("Category", self.category.as_deref())
            .param("Location", self.location.as_deref())
            .param("Status", self.status)
            .param("OrderColumn", self.order_column)
            .param("OrderDirection", self.order_direction)
    }
}

impl ListQuery for InventoryListQuery {
    fn page(&self) -> Option<u32> {
        self.page
    }

    fn page_size(&self) -> Option<u32> {
        self.page_size
    }
}

impl Entity for InventoryItem {
    type Dto = InventoryItemDto;
    type CreatePayload = InventoryItemPayload;
    type UpdatePayload = InventoryItemPayload;
    type Query = InventoryListQuery;

    const BASE_PATH: &'static str = "/api/inventory";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_dto(dto: InventoryItemDto) -> Self {
        dto.into()
    }
}
