//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Usuario`] - A user account
//! - [`Estado`] - A status label with color and criticality level
//! - [`Documentacion`] - A required document type
//! - [`Recurso`] - A person holding documents
//! - [`Entidad`] - An organization holding documents and linked recursos
//! - [`Asignacion`] - A documentacion assigned to a recurso or entidad
//! - [`Vinculo`] - An entidad ↔ recurso link
//! - [`DocumentoArchivo`] - A file attached to a document
//!
//! Creation uses `New*` structs or complete `*Valores`; partial updates use
//! `Update*`/`*Patch` structs whose `apply` merges them into current values.

pub mod archivo;
pub mod asignacion;
pub mod documentacion;
pub mod entidad;
pub mod estado;
pub mod recurso;
pub mod usuario;
pub mod vencible;

pub use archivo::{ArchivoOwner, DocumentoArchivo, NewDocumentoArchivo};
pub use asignacion::{
    Asignacion, AsignacionPatch, AsignacionValores, EntidadDocFlags, NuevaAsignacion,
    TipoAsignacion, Vinculo, VinculoPatch, VinculoValores,
};
pub use documentacion::{Documentacion, DocumentacionValores, UpdateDocumentacion};
pub use entidad::{Entidad, EntidadValores, UpdateEntidad};
pub use estado::{Estado, NewEstado, UpdateEstado};
pub use recurso::{Recurso, RecursoValores, UpdateRecurso};
pub use usuario::{CurrentUser, NewUsuario, Rol, UpdateUsuario, Usuario};
pub use vencible::{DocumentoVencible, EstadoConteo, Totales, VencimientoFilter, VencimientoItem};
