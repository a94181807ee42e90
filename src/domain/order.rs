use std::fmt;
use serde::{Deserialize, Serialize};

use crate::actor_framework::Entity;
use crate::domain::loose::{integer_or_zero, number_or_zero, Loose};
use crate::query::{ListQuery, QueryBuilder, SortDirection, ToQuery};

// Two status schemes are in use for orders and neither is confirmed against
// the server. Both are exposed; `Order::order_status` stays the raw code.

/// Two-value order status scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Processing,
    Pending,
}

impl OrderStatus {
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "0",
            OrderStatus::Pending => "1",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "0" => Some(OrderStatus::Processing),
            "1" => Some(OrderStatus::Pending),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Seven-value order status scheme, codes `0..=6`. Labels are not known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtendedOrderStatus(u8);

impl ExtendedOrderStatus {
    pub const MAX_CODE: u8 = 6;

    pub fn new(code: u8) -> Option<Self> {
        (code <= Self::MAX_CODE).then_some(Self(code))
    }

    pub fn from_code(code: &str) -> Option<Self> {
        code.trim().parse::<u8>().ok().and_then(Self::new)
    }

    pub fn code(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ExtendedOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Order items
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderItemDto {
    pub id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub inventory_item_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<Loose>,
    #[serde(default)]
    pub unit_price: Option<Loose>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub inventory_item_id: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl From<OrderItemDto> for OrderItem {
    fn from(dto: OrderItemDto) -> Self {
        Self {
            id: dto.id,
            order_id: dto.order_id.unwrap_or_default(),
            inventory_item_id: dto.inventory_item_id.unwrap_or_default(),
            quantity: integer_or_zero(dto.quantity.as_ref()),
            unit_price: number_or_zero(dto.unit_price.as_ref()),
        }
    }
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    /// Items are listed per parent order.
    pub fn list_path_for(order_id: &str) -> String {
        format!("{}/list/{}", Self::BASE_PATH, urlencoding::encode(order_id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsertOrderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub inventory_item_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderItemSortColumn {
    Id,
    OrderId,
    InventoryItemId,
    Quantity,
    UnitPrice,
}

impl fmt::Display for OrderItemSortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderItemSortColumn::Id => "Id",
            OrderItemSortColumn::OrderId => "OrderId",
            OrderItemSortColumn::InventoryItemId => "InventoryItemId",
            OrderItemSortColumn::Quantity => "Quantity",
            OrderItemSortColumn::UnitPrice => "UnitPrice",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderItemListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub id: Option<String>,
    pub order_id: Option<String>,
    pub inventory_item_id: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
    pub order_column: Option<OrderItemSortColumn>,
    pub order_direction: Option<SortDirection>,
}

impl ToQuery for OrderItemListQuery {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .param("Page", self.page)
            .param("PageSize", self.page_size)
            .param("Id", self.id.as_deref())
            .param("OrderId", self.order_id.as_deref())
            .param("InventoryItemId", self.inventory_item_id.as_deref())
            .param("Quantity", self.quantity)
            .param("UnitPrice", self.unit_price)
            .param("OrderColumn", self.order_column)
            .param("OrderDirection", self.order_direction)
    }
}

impl ListQuery for OrderItemListQuery {
    fn page(&self) -> Option<u32> {
        self.page
    }

    fn page_size(&self) -> Option<u32> {
        self.page_size
    }
}

impl Entity for OrderItem {
    type Dto = OrderItemDto;
    type CreatePayload = UpsertOrderItem;
    type UpdatePayload = UpsertOrderItem;
    type Query = OrderItemListQuery;

    const BASE_PATH: &'static str = "/api/orderItem";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_dto(dto: OrderItemDto) -> Self {
        dto.into()
    }
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderDto {
    pub id: String,
    #[serde(default)]
    pub order_type: Option<String>,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub order_status: Option<Loose>,
    #[serde(default)]
    pub order_completed_date: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer: Option<CustomerDto>,
    #[serde(default)]
    pub order_items: Option<Vec<OrderItemDto>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub order_type: String,
    pub order_date: String,
    /// Raw wire code; see [`OrderStatus`] and [`ExtendedOrderStatus`].
    pub order_status: String,
    pub order_completed_date: String,
    pub customer_name: String,
    pub customer_email: String,
    pub order_items: Vec<OrderItem>,
}

impl Order {
    pub fn status(&self) -> Option<OrderStatus> {
        OrderStatus::from_code(&self.order_status)
    }

    pub fn extended_status(&self) -> Option<ExtendedOrderStatus> {
        ExtendedOrderStatus::from_code(&self.order_status)
    }

    pub fn total(&self) -> f64 {
        self.order_items.iter().map(OrderItem::line_total).sum()
    }
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        let customer = dto.customer.unwrap_or_default();
        Self {
            id: dto.id,
            order_type: dto.order_type.unwrap_or_default(),
            order_date: dto.order_date.unwrap_or_default(),
            order_status: dto.order_status.map(|s| s.to_code()).unwrap_or_default(),
            order_completed_date: dto.order_completed_date.unwrap_or_default(),
            customer_name: customer.name.or(dto.customer_name).unwrap_or_default(),
            customer_email: customer.email.or(dto.customer_email).unwrap_or_default(),
            order_items: dto
                .order_items
                .unwrap_or_default()
                .into_iter()
                .map(OrderItem::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsertOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    pub order_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_completed_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_items: Option<Vec<UpsertOrderItem>>,
}

impl UpsertOrder {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortColumn {
    Id,
    OrderType,
    OrderDate,
    OrderStatus,
    OrderCompletedDate,
}

impl fmt::Display for OrderSortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderSortColumn::Id => "Id",
            OrderSortColumn::OrderType => "OrderType",
            OrderSortColumn::OrderDate => "OrderDate",
            OrderSortColumn::OrderStatus => "OrderStatus",
            OrderSortColumn::OrderCompletedDate => "OrderCompletedDate",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub id: Option<String>,
    pub order_type: Option<String>,
    pub order_date: Option<String>,
    pub order_status: Option<String>,
    pub order_completed_date: Option<String>,
    pub order_column: Option<OrderSortColumn>,
    pub order_direction: Option<SortDirection>,
}

impl OrderListQuery {
    pub fn paged(page: u32, page_size: u32) -> Self {
        Self { page: Some(page), page_size: Some(page_size), ..Self::default() }
    }
}

impl ToQuery for OrderListQuery {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .param("Page", self.page)
            .param("PageSize", self.page_size)
            .param("Id", self.id.as_deref())
            .param("OrderType", self.order_type.as_deref())
            .param("OrderDate", self.order_date.as_deref())
            .param("OrderStatus", self.order_status.as_deref())
            .param("OrderCompletedDate", self.order_completed_date.as_deref())
            .param("OrderColumn", self.order_column)
            .param("OrderDirection", self.order_direction)
    }
}

impl ListQuery for OrderListQuery {
    fn page(&self) -> Option<u32> {
        self.page
    }

    fn page_size(&self) -> Option<u32> {
        self.page_size
    }
}

impl Entity for Order {
    type Dto = OrderDto;
    type CreatePayload = UpsertOrder;
    type UpdatePayload = UpsertOrder;
    type Query = OrderListQuery;

    const BASE_PATH: &'static str = "/api/order";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_dto(dto: OrderDto) -> Self {
        dto.into()
    }
}
