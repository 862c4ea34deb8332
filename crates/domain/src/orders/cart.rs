use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, Medicine},
    errors::Error,
};

/// Flat delivery charge applied to any non-empty order
pub const DELIVERY_FEE: u32 = 50;

/// Most units of one medicine a cart or order line may hold
pub const MAX_QUANTITY: u32 = 99;

pub fn delivery_fee(subtotal: u32) -> u32 {
    if subtotal > 0 {
        DELIVERY_FEE
    } else {
        0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct CartItem {
    pub medicine_id: String,
    pub quantity: u32,
}

/// Line item priced against the catalog; also the order snapshot
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct OrderLine {
    pub medicine_id: String,
    pub name: String,
    pub unit_price: u32,
    pub quantity: u32,
    pub prescription_required: bool,
}

impl OrderLine {
    pub fn from_medicine(medicine: &Medicine, quantity: u32) -> Self {
        Self {
            medicine_id: medicine.id.clone(),
            name: medicine.name.clone(),
            unit_price: medicine.price,
            quantity,
            prescription_required: medicine.prescription_required,
        }
    }

    pub fn line_total(&self) -> u32 {
        self.unit_price.saturating_mul(self.quantity)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct CartTotals {
    pub lines: Vec<OrderLine>,
    pub subtotal: u32,
    pub delivery_fee: u32,
    pub total: u32,
    pub prescription_required: bool,
}

impl CartTotals {
    pub fn from_lines(lines: Vec<OrderLine>) -> Self {
        let subtotal = lines
            .iter()
            .map(OrderLine::line_total)
            .fold(0u32, u32::saturating_add);
        let delivery_fee = delivery_fee(subtotal);
        let prescription_required = lines.iter().any(|l| l.prescription_required);
        Self {
            lines,
            subtotal,
            delivery_fee,
            total: subtotal.saturating_add(delivery_fee),
            prescription_required,
        }
    }
}

/// Medicines a user intends to order, one entry per medicine
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` units, merging with an existing entry.
    /// The merged quantity may not exceed [`MAX_QUANTITY`].
    pub fn add(&mut self, medicine_id: &str, quantity: u32) -> Result<(), Error> {
        if quantity == 0 {
            return Ok(());
        }
        match self.items.iter_mut().find(|i| i.medicine_id == medicine_id) {
            Some(item) => {
                item.quantity = checked_quantity(item.quantity.checked_add(quantity))?;
            }
            None => self.items.push(CartItem {
                medicine_id: medicine_id.to_string(),
                quantity: checked_quantity(Some(quantity))?,
            }),
        }
        Ok(())
    }

    /// Sets the quantity of an entry; anything below 1 removes it.
    /// Returns whether the medicine was in the cart.
    pub fn update_quantity(&mut self, medicine_id: &str, quantity: i64) -> Result<bool, Error> {
        let Some(index) = self.items.iter().position(|i| i.medicine_id == medicine_id) else {
            return Ok(false);
        };
        if quantity < 1 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = checked_quantity(u32::try_from(quantity).ok())?;
        }
        Ok(true)
    }

    pub fn remove(&mut self, medicine_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.medicine_id != medicine_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Takes ordered quantities out of the cart, leaving anything added since
    pub fn deduct(&mut self, lines: &[OrderLine]) {
        for line in lines {
            if let Some(item) = self.items.iter_mut().find(|i| i.medicine_id == line.medicine_id) {
                item.quantity = item.quantity.saturating_sub(line.quantity);
            }
        }
        self.items.retain(|i| i.quantity > 0);
    }

    /// Entries joined with the catalog; medicines no longer listed are skipped
    pub fn lines(&self, catalog: &Catalog) -> Vec<OrderLine> {
        self.items
            .iter()
            .filter_map(|item| {
                catalog
                    .medicine(&item.medicine_id)
                    .map(|m| OrderLine::from_medicine(m, item.quantity))
            })
            .collect()
    }

    pub fn totals(&self, catalog: &Catalog) -> CartTotals {
        CartTotals::from_lines(self.lines(catalog))
    }
}

fn checked_quantity(quantity: Option<u32>) -> Result<u32, Error> {
    quantity
        .filter(|q| *q <= MAX_QUANTITY)
        .ok_or_else(|| Error::validation(format!("Quantity cannot exceed {MAX_QUANTITY}")))
}
