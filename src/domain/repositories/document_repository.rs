use async_trait::async_trait;

use crate::common::errors::Result;
use crate::domain::entities::document::Document;

#[async_trait]
pub trait DocumentRepository: Send + Sync + 'static {
    /// Obtiene un documento por ID, esté o no en la papelera
    async fn get_document_by_id(&self, id: &str) -> Result<Option<Document>>;

    /// Lista todos los documentos, incluidos los que están en la papelera
    async fn list_documents(&self) -> Result<Vec<Document>>;
}
