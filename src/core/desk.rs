//! Work order intake: the creation and update paths with their side
//! effects (photo storage and team notification).

use crate::core::work_orders::WorkOrderRepository;
use crate::models::{NewWorkOrder, OperationResult, Priority, WorkOrderChanges};
use crate::services::blob::{BlobStore, photo_name};
use crate::services::notify::NotificationService;

/// Anything able to open a work order from a [`NewWorkOrder`].
pub trait OrderIntake {
    fn open_order(&mut self, input: NewWorkOrder) -> OperationResult;
}

impl OrderIntake for WorkOrderRepository {
    fn open_order(&mut self, input: NewWorkOrder) -> OperationResult {
        self.create(&input)
    }
}

/// Who gets told about new work orders.
#[derive(Debug, Clone, Default)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub recipients: Vec<String>,
}

pub struct WorkOrderDesk {
    orders: WorkOrderRepository,
    blobs: Box<dyn BlobStore>,
    notifier: Box<dyn NotificationService>,
    settings: NotificationSettings,
}

impl WorkOrderDesk {
    pub fn new(
        orders: WorkOrderRepository,
        blobs: Box<dyn BlobStore>,
        notifier: Box<dyn NotificationService>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            orders,
            blobs,
            notifier,
            settings,
        }
    }

    pub fn orders(&mut self) -> &mut WorkOrderRepository {
        &mut self.orders
    }

    /// Store `bytes` as a photo of `order_id`; failures only get logged.
    fn store_photo(&self, bytes: &[u8], order_id: &str, kind: &str) -> Option<String> {
        match self.blobs.save(bytes, &photo_name(order_id, kind)) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::error!(error = %e, order = order_id, kind, "photo upload failed");
                None
            }
        }
    }

    /// Create a work order.
    ///
    /// A photo that fails to upload leaves the order without a photo url,
    /// and a failed notification never undoes the creation.
    pub fn create(&mut self, mut input: NewWorkOrder) -> OperationResult {
        if let Some(bytes) = input.photo.take() {
            // The id is not known yet.
            if let Some(url) = self.store_photo(&bytes, "temp", "avaria") {
                input.photo_url = Some(url);
            }
        }

        let result = self.orders.create(&input);
        if result.success
            && let Some(id) = &result.id
        {
            self.announce(id, &input);
        }
        result
    }

    /// Apply `changes`, storing the completion photo first when given.
    pub fn update(&mut self, id: &str, mut changes: WorkOrderChanges) -> OperationResult {
        if let Some(bytes) = changes.repair_photo.take()
            && let Some(url) = self.store_photo(&bytes, id, "repair")
        {
            changes.repair_photo_url = Some(url);
        }
        self.orders.update(id, &changes)
    }

    fn announce(&self, id: &str, input: &NewWorkOrder) {
        if !self.settings.enabled || self.settings.recipients.is_empty() {
            return;
        }
        let priority = input.priority.unwrap_or_default();
        let (subject, body) = notification_message(id, priority, input);
        if let Err(e) = self
            .notifier
            .notify(&self.settings.recipients, &subject, &body)
        {
            tracing::warn!(error = %e, id, "notification not delivered");
        }
    }
}

impl OrderIntake for WorkOrderDesk {
    fn open_order(&mut self, input: NewWorkOrder) -> OperationResult {
        self.create(input)
    }
}

/// Subject and body announcing a new work order.
pub fn notification_message(id: &str, priority: Priority, input: &NewWorkOrder) -> (String, String) {
    let urgent = if priority == Priority::Urgent {
        " URGENT"
    } else {
        ""
    };
    let subject = format!("[Hotel] New WO{urgent}: {id}");
    let body = format!(
        "New work order opened\n\n\
         Id: {id}\n\
         Sector: {}\n\
         Location: {}\n\
         Priority: {}\n\
         Requester: {}\n\n\
         Problem:\n{}",
        input.sector,
        input.location,
        priority.as_str(),
        input.requester,
        input.description
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgent_orders_are_flagged_in_the_subject() {
        let input = NewWorkOrder {
            sector: "Kitchen".into(),
            description: "Gas leak".into(),
            ..Default::default()
        };
        let (subject, body) = notification_message("OS-20250101-1234", Priority::Urgent, &input);
        assert_eq!(subject, "[Hotel] New WO URGENT: OS-20250101-1234");
        assert!(body.contains("Gas leak"));

        let (subject, _) = notification_message("OS-20250101-1234", Priority::Low, &input);
        assert_eq!(subject, "[Hotel] New WO: OS-20250101-1234");
    }
}
