//! Per-entity page: a browser plus the create/edit modal and the draft behind it.

use crate::config::{ConsoleSettings, ResourceIdentity};
use crate::error::AppError;
use crate::row::Row;
use crate::service::CrudService;
use crate::transport::Transport;
use crate::views::browser::{BrowserEvent, Column, EntityBrowser, RowIdFn};
use crate::views::form::{Draft, EditSource, FormSchema};
use crate::views::modal::{FormModal, ModalAction};
use std::sync::Arc;

pub const NO_EXTRA_FIELDS: &str = "No extra fields. Click Save to create with defaults.";

/// Columns the generic page shows when the registry gives none.
pub fn default_generic_columns() -> Vec<Column> {
    vec![Column::new("created_at", "Created")]
}

pub struct EntityPage {
    resource: ResourceIdentity,
    schema: FormSchema,
    transport: Arc<dyn Transport>,
    browser: EntityBrowser,
    /// The modal body is the draft; the page owns and discards it.
    modal: FormModal<Draft>,
    /// `None` while creating.
    editing: Option<Row>,
    error: Option<String>,
}

impl EntityPage {
    pub fn new(
        resource: ResourceIdentity,
        columns: Vec<Column>,
        schema: FormSchema,
        transport: Arc<dyn Transport>,
        settings: &ConsoleSettings,
    ) -> Self {
        let browser = EntityBrowser::new(resource.clone(), columns, Arc::clone(&transport), settings);
        Self {
            resource,
            schema,
            transport,
            browser,
            modal: FormModal::new(true),
            editing: None,
            error: None,
        }
    }

    /// Page for an entity known only by title and base path.
    pub fn generic(resource: ResourceIdentity, transport: Arc<dyn Transport>, settings: &ConsoleSettings) -> Self {
        Self::new(resource, default_generic_columns(), FormSchema::Introspected, transport, settings)
    }

    /// Use a different field as the record key, for the browser and for edits alike.
    pub fn with_row_id(mut self, row_id: RowIdFn) -> Self {
        self.browser = self.browser.with_row_id(row_id);
        self
    }

    pub fn resource(&self) -> &ResourceIdentity {
        &self.resource
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn browser(&self) -> &EntityBrowser {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut EntityBrowser {
        &mut self.browser
    }

    pub fn modal(&self) -> &FormModal<Draft> {
        &self.modal
    }

    pub fn draft(&self) -> &Draft {
        self.modal.body()
    }

    pub fn editing(&self) -> Option<&Row> {
        self.editing.as_ref()
    }

    /// Page-level error (a failed record load).
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Hint shown in place of fields when a generic create form has none.
    pub fn modal_hint(&self) -> Option<&'static str> {
        let generic_create = matches!(self.schema, FormSchema::Introspected) && self.editing.is_none();
        (self.modal.is_open() && generic_create && self.draft().is_empty()).then_some(NO_EXTRA_FIELDS)
    }

    /// Route a browser event to create or edit.
    pub async fn handle(&mut self, event: BrowserEvent) -> Result<(), AppError> {
        match event {
            BrowserEvent::Add => {
                self.open_create();
                Ok(())
            }
            BrowserEvent::Edit(row) => self.open_edit(row).await,
        }
    }

    pub fn open_create(&mut self) {
        self.editing = None;
        self.error = None;
        let draft = match &self.schema {
            FormSchema::Fixed { fields, .. } => Draft::defaults(fields),
            FormSchema::Introspected => Draft::default(),
        };
        self.modal.show(format!("Create {}", self.resource.title), draft);
    }

    /// Prepare an edit draft and open the modal. A failed record load leaves the modal closed
    /// and reports the error at page level.
    pub async fn open_edit(&mut self, row: Row) -> Result<(), AppError> {
        self.error = None;
        let draft = match self.load_draft(&row).await {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(
                    base_path = %self.resource.base_path,
                    id = %self.browser.row_id(&row),
                    error = %e,
                    "record load failed"
                );
                self.editing = None;
                self.error = Some(e.user_message());
                return Err(e);
            }
        };
        self.editing = Some(row);
        self.modal.show(format!("Edit {}", self.resource.title), draft);
        Ok(())
    }

    async fn load_draft(&self, row: &Row) -> Result<Draft, AppError> {
        let id = self.browser.row_id(row);
        match &self.schema {
            FormSchema::Fixed {
                fields,
                edit_source: EditSource::Row,
            } => Ok(Draft::from_row(fields, row)),
            FormSchema::Fixed {
                fields,
                edit_source: EditSource::Refetch,
            } => {
                let fresh = CrudService::read(self.transport.as_ref(), &self.resource, id).await?;
                Ok(Draft::from_row(fields, &fresh))
            }
            FormSchema::Introspected => {
                let fresh = CrudService::read(self.transport.as_ref(), &self.resource, id).await?;
                Ok(Draft::introspect(&fresh))
            }
        }
    }

    /// Typed input into a draft field.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.modal.is_open() && self.modal.body_mut().set(name, value)
    }

    /// Close the modal and throw the draft away.
    pub fn cancel(&mut self) {
        self.modal.close();
        *self.modal.body_mut() = Draft::default();
        self.editing = None;
    }

    /// Click on a modal button.
    pub async fn press(&mut self, action: ModalAction) -> Result<(), AppError> {
        match self.modal.press(action) {
            Some(ModalAction::Cancel) => {
                self.cancel();
                Ok(())
            }
            Some(ModalAction::Save) => self.run_submit().await,
            None => Ok(()),
        }
    }

    /// Save: PATCH `base_path/id` when editing, POST `base_path` when creating. Success closes
    /// the modal and refetches the list from page 1; failure keeps the modal and draft open with
    /// the error shown inline.
    pub async fn submit(&mut self) -> Result<(), AppError> {
        if !self.modal.is_open() {
            return Err(AppError::BadRequest("no form is open".into()));
        }
        self.press(ModalAction::Save).await
    }

    async fn run_submit(&mut self) -> Result<(), AppError> {
        let body = self.draft().to_body();
        let transport = self.transport.as_ref();
        let result = match &self.editing {
            Some(row) => {
                let id = self.browser.row_id(row);
                CrudService::update(transport, &self.resource, id, &body).await.map(|_| ())
            }
            None => CrudService::create(transport, &self.resource, &body).await.map(|_| ()),
        };
        match result {
            Ok(()) => {
                self.cancel();
                self.browser.invalidate();
                self.browser.sync().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(base_path = %self.resource.base_path, error = %e, "submit failed");
                self.modal.finish_submit(Some(e.user_message()));
                Err(e)
            }
        }
    }
}
