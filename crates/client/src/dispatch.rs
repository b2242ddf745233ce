//! Delegated click dispatch.
//!
//! A click is described by its container and the path from the target element
//! up through its ancestors. The row is found by closest-ancestor match on the
//! row class, the action by the class tags of the target itself.

use cartsync_core::{DomainError, ItemId};

pub const INVENTORY_ROW: &str = "inventory__item";
pub const CART_ROW: &str = "cart__item";

/// Element that received a delegated listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Container {
    Inventory,
    Cart,
    Checkout,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub classes: Vec<String>,
    pub data_id: Option<String>,
}

impl Element {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            data_id: None,
        }
    }

    pub fn with_data_id(mut self, id: impl Into<String>) -> Self {
        self.data_id = Some(id.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// `tag` as a plain class or as a BEM modifier (`block__elem--tag`).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.classes.iter().any(|c| {
            c == tag
                || c.strip_suffix(tag)
                    .is_some_and(|prefix| prefix.ends_with("--"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub container: Container,
    /// Target first, then ancestors up to (excluding) the container.
    pub path: Vec<Element>,
}

impl ClickEvent {
    pub fn new(container: Container, path: Vec<Element>) -> Self {
        Self { container, path }
    }

    /// Click on a row control, e.g. `("inventory__item", "7", "inventory__btn--add")`.
    pub fn on_row(
        container: Container,
        row_class: &str,
        data_id: impl Into<String>,
        control_classes: &[&str],
    ) -> Self {
        Self::new(
            container,
            vec![
                Element::new(control_classes.iter().copied()),
                Element::new([row_class]).with_data_id(data_id),
            ],
        )
    }

    pub fn checkout() -> Self {
        Self::new(Container::Checkout, vec![Element::new(["cart__checkout"])])
    }

    pub fn target(&self) -> Option<&Element> {
        self.path.first()
    }

    /// Nearest element on the path (target included) carrying `class`.
    pub fn closest(&self, class: &str) -> Option<&Element> {
        self.path.iter().find(|el| el.has_class(class))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    AddToCart(ItemId),
    IncreaseInventory(ItemId),
    DecreaseInventory(ItemId),
    EditCartItem(ItemId),
    IncreaseDraft(ItemId),
    DecreaseDraft(ItemId),
    SaveCartItem(ItemId),
    DeleteCartItem(ItemId),
    Checkout,
}

type RowAction = fn(ItemId) -> Action;

const INVENTORY_TABLE: &[(&str, RowAction)] = &[
    ("add", Action::AddToCart),
    ("increase", Action::IncreaseInventory),
    ("decrease", Action::DecreaseInventory),
];

const CART_TABLE: &[(&str, RowAction)] = &[
    ("edit", Action::EditCartItem),
    ("increase", Action::IncreaseDraft),
    ("decrease", Action::DecreaseDraft),
    ("save", Action::SaveCartItem),
    ("delete", Action::DeleteCartItem),
];

/// Resolve a click to an action.
///
/// `Ok(None)` means the click did not land on a control inside a row and is
/// ignored. A matching row without a numeric `data-id` is an error.
pub fn resolve(event: &ClickEvent) -> Result<Option<Action>, DomainError> {
    let (row_class, table) = match event.container {
        Container::Checkout => return Ok(Some(Action::Checkout)),
        Container::Inventory => (INVENTORY_ROW, INVENTORY_TABLE),
        Container::Cart => (CART_ROW, CART_TABLE),
    };

    let Some(row) = event.closest(row_class) else {
        return Ok(None);
    };
    let Some(target) = event.target() else {
        return Ok(None);
    };
    let Some((_, build)) = table.iter().find(|(tag, _)| target.has_tag(tag)) else {
        return Ok(None);
    };

    let id = ItemId::from_attr(row.data_id.as_deref())?;
    Ok(Some(build(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bem_modifier_matches_tag() {
        let el = Element::new(["inventory__btn", "inventory__btn--add"]);
        assert!(el.has_tag("add"));
        assert!(!el.has_tag("btn"));
        assert!(!Element::new(["inventory__btn--padd"]).has_tag("add"));
        assert!(Element::new(["save"]).has_tag("save"));
    }

    #[test]
    fn inventory_controls_resolve() {
        let add = ClickEvent::on_row(Container::Inventory, INVENTORY_ROW, "3", &["inventory__btn--add"]);
        let inc = ClickEvent::on_row(Container::Inventory, INVENTORY_ROW, "3", &["inventory__btn--increase"]);
        let dec = ClickEvent::on_row(Container::Inventory, INVENTORY_ROW, "3", &["inventory__btn--decrease"]);
        assert_eq!(resolve(&add).unwrap(), Some(Action::AddToCart(ItemId::new(3))));
        assert_eq!(resolve(&inc).unwrap(), Some(Action::IncreaseInventory(ItemId::new(3))));
        assert_eq!(resolve(&dec).unwrap(), Some(Action::DecreaseInventory(ItemId::new(3))));
    }

    #[test]
    fn cart_controls_resolve() {
        for (class, expected) in [
            ("cart__btn--edit", Action::EditCartItem(ItemId::new(5))),
            ("cart__btn--increase", Action::IncreaseDraft(ItemId::new(5))),
            ("cart__btn--decrease", Action::DecreaseDraft(ItemId::new(5))),
            ("cart__btn--save", Action::SaveCartItem(ItemId::new(5))),
            ("cart__btn--delete", Action::DeleteCartItem(ItemId::new(5))),
        ] {
            let event = ClickEvent::on_row(Container::Cart, CART_ROW, "5", &[class]);
            assert_eq!(resolve(&event).unwrap(), Some(expected));
        }
    }

    #[test]
    fn clicks_outside_controls_or_rows_are_ignored() {
        let on_label = ClickEvent::on_row(Container::Inventory, INVENTORY_ROW, "3", &["inventory__name"]);
        assert_eq!(resolve(&on_label).unwrap(), None);

        let no_row = ClickEvent::new(
            Container::Inventory,
            vec![Element::new(["inventory__btn--add"])],
        );
        assert_eq!(resolve(&no_row).unwrap(), None);

        // A cart control inside an inventory row does not match the cart table.
        let wrong_row = ClickEvent::on_row(Container::Cart, INVENTORY_ROW, "3", &["cart__btn--delete"]);
        assert_eq!(resolve(&wrong_row).unwrap(), None);
    }

    #[test]
    fn nested_target_finds_enclosing_row() {
        let event = ClickEvent::new(
            Container::Cart,
            vec![
                Element::new(["cart__btn", "cart__btn--delete"]),
                Element::new(["cart__actions"]),
                Element::new([CART_ROW]).with_data_id("8"),
            ],
        );
        assert_eq!(resolve(&event).unwrap(), Some(Action::DeleteCartItem(ItemId::new(8))));
    }

    #[test]
    fn invalid_row_id_is_an_error() {
        let bad = ClickEvent::on_row(Container::Inventory, INVENTORY_ROW, "abc", &["inventory__btn--add"]);
        assert!(resolve(&bad).is_err());

        let missing = ClickEvent::new(
            Container::Inventory,
            vec![Element::new(["inventory__btn--add"]), Element::new([INVENTORY_ROW])],
        );
        assert!(resolve(&missing).is_err());
    }

    #[test]
    fn checkout_container_always_checks_out() {
        assert_eq!(resolve(&ClickEvent::checkout()).unwrap(), Some(Action::Checkout));
    }
}
