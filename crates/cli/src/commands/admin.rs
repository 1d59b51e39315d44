//! Back-office commands.
//!
//! # Usage
//!
//! ```bash
//! mm-cli admin categories list
//! mm-cli admin categories create -n Bebidas -d "Gaseosas y jugos"
//! mm-cli admin categories update 4 -n Bebidas
//! mm-cli admin categories delete 4
//! mm-cli admin products create -n "Leche Gloria" -c 1 --image-file ./leche.png
//! mm-cli admin inventories create --product 7 --supplier 2 --stock 25 --price 4.50
//! mm-cli admin orders create --user 5 --method 1 --line 3:2:4.50 --line 7:1:2.00
//! mm-cli admin users set-role 8 --role 1
//! mm-cli admin report --out /tmp
//! ```
//!
//! Every action is checked against the signed-in role before any request
//! goes out: staff may list and create, only administrators update and
//! delete, and the users and roles screens are administrator-only
//! throughout. A backend denial clears the session; the command prints
//! sign-in guidance and exits nonzero.

use std::path::PathBuf;

use clap::Subcommand;
use minimarket_admin::{
    AdminError, AdminOrderDraft, AdminOrderDraftLine, CategoryTable, InventoryTable, OrderTable,
    PaymentMethodTable, ProductTable, Reports, RoleTable, SupplierTable, UserDirectory,
};
use minimarket_api::models::{
    NewCategory, NewInventory, NewPaymentMethod, NewProduct, NewRole, NewSupplier,
};
use minimarket_core::{
    CategoryId, InventoryId, OrderId, PaymentMethodId, ProductId, RoleId, SupplierId, UserId,
};
use rust_decimal::Decimal;

use crate::context::AppContext;
use crate::output;

#[derive(Subcommand)]
pub enum AdminAction {
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage suppliers
    Suppliers {
        #[command(subcommand)]
        action: SupplierAction,
    },
    /// Manage payment methods
    PaymentMethods {
        #[command(subcommand)]
        action: PaymentMethodAction,
    },
    /// Manage inventory records
    Inventories {
        #[command(subcommand)]
        action: InventoryAction,
    },
    /// Manage roles
    Roles {
        #[command(subcommand)]
        action: RoleAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Download the inventory spreadsheet
    Report {
        /// Directory the spreadsheet is written into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List categories
    List,
    /// Create a category
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Update a category
    Update {
        id: i32,

        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a category
    Delete { id: i32 },
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products
    List,
    /// Create a product
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Category id
        #[arg(short, long)]
        category: i32,

        /// Filename of an already-uploaded image
        #[arg(long)]
        image: Option<String>,

        /// Local image to upload first
        #[arg(long, conflicts_with = "image")]
        image_file: Option<PathBuf>,
    },
    /// Update a product
    Update {
        id: i32,

        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Category id
        #[arg(short, long)]
        category: i32,

        /// Filename of an already-uploaded image
        #[arg(long)]
        image: Option<String>,

        /// Local image to upload first
        #[arg(long, conflicts_with = "image")]
        image_file: Option<PathBuf>,
    },
    /// Delete a product
    Delete { id: i32 },
}

#[derive(Subcommand)]
pub enum SupplierAction {
    /// List suppliers
    List,
    /// Create a supplier
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        address: String,

        #[arg(long)]
        ruc: String,
    },
    /// Update a supplier
    Update {
        id: i32,

        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        address: String,

        #[arg(long)]
        ruc: String,
    },
    /// Delete a supplier
    Delete { id: i32 },
}

#[derive(Subcommand)]
pub enum PaymentMethodAction {
    /// List payment methods
    List,
    /// Create a payment method
    Create {
        #[arg(short, long)]
        name: String,
    },
    /// Update a payment method
    Update {
        id: i32,

        #[arg(short, long)]
        name: String,
    },
    /// Delete a payment method
    Delete { id: i32 },
}

#[derive(Subcommand)]
pub enum InventoryAction {
    /// List inventory records
    List,
    /// Create an inventory record
    Create {
        /// Product id
        #[arg(long)]
        product: i32,

        /// Supplier id
        #[arg(long)]
        supplier: i32,

        #[arg(long)]
        stock: u32,

        /// Sale price in soles
        #[arg(long)]
        price: Decimal,
    },
    /// Update an inventory record
    Update {
        id: i32,

        /// Product id
        #[arg(long)]
        product: i32,

        /// Supplier id
        #[arg(long)]
        supplier: i32,

        #[arg(long)]
        stock: u32,

        /// Sale price in soles
        #[arg(long)]
        price: Decimal,
    },
    /// Delete an inventory record
    Delete { id: i32 },
}

#[derive(Subcommand)]
pub enum RoleAction {
    /// List roles
    List,
    /// Create a role
    Create {
        #[arg(short, long)]
        name: String,
    },
    /// Update a role
    Update {
        id: i32,

        #[arg(short, long)]
        name: String,
    },
    /// Delete a role
    Delete { id: i32 },
}

#[derive(Subcommand)]
pub enum OrderAction {
    /// List every order
    List,
    /// Create an order on a customer's behalf
    Create {
        /// Customer user id
        #[arg(short, long)]
        user: i32,

        /// Payment method id
        #[arg(short, long)]
        method: i32,

        /// Order line as INVENTORY:QUANTITY:PRICE (repeatable)
        #[arg(long = "line", value_parser = parse_order_line, required = true)]
        lines: Vec<AdminOrderDraftLine>,
    },
    /// Delete an order
    Delete { id: i32 },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// List every account
    List,
    /// Assign a role to a user
    SetRole {
        user_id: i32,

        /// Role id from `admin roles list`
        #[arg(short, long)]
        role: i32,
    },
}

/// Upload `--image-file` when given, otherwise pass `--image` through.
async fn resolve_image(
    ctx: &AppContext,
    image: Option<String>,
    image_file: Option<PathBuf>,
) -> Result<Option<String>, AdminError> {
    let Some(path) = image_file else {
        return Ok(image);
    };
    let bytes = std::fs::read(&path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("imagen.png");
    let stored = ctx.client.upload_image(file_name, bytes).await?;
    Ok(Some(stored))
}

fn parse_order_line(raw: &str) -> Result<AdminOrderDraftLine, String> {
    let mut parts = raw.splitn(3, ':');
    let (Some(inventory), Some(quantity), Some(price)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err("expected INVENTORY:QUANTITY:PRICE".to_string());
    };
    let inventory_id = inventory
        .parse::<i32>()
        .map_err(|e| format!("bad inventory id: {e}"))?;
    let quantity = quantity
        .parse::<u32>()
        .map_err(|e| format!("bad quantity: {e}"))?;
    let unit_price = price
        .parse::<Decimal>()
        .map_err(|e| format!("bad price: {e}"))?;
    Ok(AdminOrderDraftLine {
        line_id: None,
        inventory_id: InventoryId::new(inventory_id),
        quantity,
        unit_price,
    })
}

/// Attach sign-in guidance when the backend denied the request (the
/// denial hook has already cleared the session by then).
pub(crate) fn denial_guidance(err: AdminError) -> AdminError {
    if err.is_denied() {
        tracing::warn!("Session expired; sign in again with `mm-cli auth login`");
    }
    err
}

pub async fn run(ctx: &AppContext, action: AdminAction) -> Result<(), AdminError> {
    dispatch(ctx, action).await.map_err(denial_guidance)
}

async fn dispatch(ctx: &AppContext, action: AdminAction) -> Result<(), AdminError> {
    match action {
        AdminAction::Categories { action } => {
            let table = CategoryTable::new(ctx.client.clone(), ctx.session.clone());
            let rows = match action {
                CategoryAction::List => table.refresh().await?,
                CategoryAction::Create { name, description } => {
                    table.create(&NewCategory { name, description }).await?
                }
                CategoryAction::Update {
                    id,
                    name,
                    description,
                } => {
                    table
                        .update(CategoryId::new(id), &NewCategory { name, description })
                        .await?
                }
                CategoryAction::Delete { id } => table.delete(CategoryId::new(id)).await?,
            };
            output::categories(&rows);
        }
        AdminAction::Products { action } => {
            let table = ProductTable::new(ctx.client.clone(), ctx.session.clone());
            let rows = match action {
                ProductAction::List => table.refresh().await?,
                ProductAction::Create {
                    name,
                    description,
                    category,
                    image,
                    image_file,
                } => {
                    let draft = NewProduct {
                        name,
                        description,
                        image: resolve_image(ctx, image, image_file).await?,
                        category_id: CategoryId::new(category),
                    };
                    table.create(&draft).await?
                }
                ProductAction::Update {
                    id,
                    name,
                    description,
                    category,
                    image,
                    image_file,
                } => {
                    let draft = NewProduct {
                        name,
                        description,
                        image: resolve_image(ctx, image, image_file).await?,
                        category_id: CategoryId::new(category),
                    };
                    table.update(ProductId::new(id), &draft).await?
                }
                ProductAction::Delete { id } => table.delete(ProductId::new(id)).await?,
            };
            output::products(&rows);
        }
        AdminAction::Suppliers { action } => {
            let table = SupplierTable::new(ctx.client.clone(), ctx.session.clone());
            let rows = match action {
                SupplierAction::List => table.refresh().await?,
                SupplierAction::Create {
                    name,
                    phone,
                    email,
                    address,
                    ruc,
                } => {
                    let draft = NewSupplier {
                        name,
                        phone,
                        email,
                        address,
                        ruc,
                    };
                    table.create(&draft).await?
                }
                SupplierAction::Update {
                    id,
                    name,
                    phone,
                    email,
                    address,
                    ruc,
                } => {
                    let draft = NewSupplier {
                        name,
                        phone,
                        email,
                        address,
                        ruc,
                    };
                    table.update(SupplierId::new(id), &draft).await?
                }
                SupplierAction::Delete { id } => table.delete(SupplierId::new(id)).await?,
            };
            output::suppliers(&rows);
        }
        AdminAction::PaymentMethods { action } => {
            let table = PaymentMethodTable::new(ctx.client.clone(), ctx.session.clone());
            let rows = match action {
                PaymentMethodAction::List => table.refresh().await?,
                PaymentMethodAction::Create { name } => {
                    table.create(&NewPaymentMethod { name }).await?
                }
                PaymentMethodAction::Update { id, name } => {
                    table
                        .update(PaymentMethodId::new(id), &NewPaymentMethod { name })
                        .await?
                }
                PaymentMethodAction::Delete { id } => {
                    table.delete(PaymentMethodId::new(id)).await?
                }
            };
            output::payment_methods(&rows);
        }
        AdminAction::Inventories { action } => {
            let table = InventoryTable::new(ctx.client.clone(), ctx.session.clone());
            let rows = match action {
                InventoryAction::List => table.refresh().await?,
                InventoryAction::Create {
                    product,
                    supplier,
                    stock,
                    price,
                } => {
                    let draft = NewInventory {
                        product_id: ProductId::new(product),
                        supplier_id: SupplierId::new(supplier),
                        stock,
                        sale_price: price,
                    };
                    table.create(&draft).await?
                }
                InventoryAction::Update {
                    id,
                    product,
                    supplier,
                    stock,
                    price,
                } => {
                    let draft = NewInventory {
                        product_id: ProductId::new(product),
                        supplier_id: SupplierId::new(supplier),
                        stock,
                        sale_price: price,
                    };
                    table.update(InventoryId::new(id), &draft).await?
                }
                InventoryAction::Delete { id } => table.delete(InventoryId::new(id)).await?,
            };
            output::inventories(&rows);
        }
        AdminAction::Roles { action } => {
            let table = RoleTable::new(ctx.client.clone(), ctx.session.clone());
            let rows = match action {
                RoleAction::List => table.refresh().await?,
                RoleAction::Create { name } => table.create(&NewRole { name }).await?,
                RoleAction::Update { id, name } => {
                    table.update(RoleId::new(id), &NewRole { name }).await?
                }
                RoleAction::Delete { id } => table.delete(RoleId::new(id)).await?,
            };
            output::roles(&rows);
        }
        AdminAction::Orders { action } => {
            let table = OrderTable::new(ctx.client.clone(), ctx.session.clone());
            let rows = match action {
                OrderAction::List => table.refresh().await?,
                OrderAction::Create {
                    user,
                    method,
                    lines,
                } => {
                    let draft = AdminOrderDraft {
                        user_id: UserId::new(user),
                        payment_method_id: PaymentMethodId::new(method),
                        lines,
                    };
                    table.create(&draft).await?
                }
                OrderAction::Delete { id } => table.delete(OrderId::new(id)).await?,
            };
            output::orders(&rows);
        }
        AdminAction::Users { action } => {
            let directory = UserDirectory::new(ctx.client.clone(), ctx.session.clone());
            let rows = match action {
                UserAction::List => directory.users().await?,
                UserAction::SetRole { user_id, role } => {
                    directory
                        .change_role(UserId::new(user_id), RoleId::new(role))
                        .await?
                }
            };
            output::users(&rows);
        }
        AdminAction::Report { out } => {
            let reports = Reports::new(ctx.client.clone(), ctx.session.clone());
            let path = reports.save_inventory_report(&out).await?;
            output::line(&format!("Inventory report saved to {}", path.display()));
        }
    }
    Ok(())
}
