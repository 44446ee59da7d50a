// Lógica de negócio pura da OS: sem I/O, sem estado escondido.
// Os serviços orquestram estes módulos contra o banco.

pub mod cpf;
pub mod draft;
pub mod format;
pub mod lookup;
pub mod pricing;
pub mod reconciler;
pub mod status;
