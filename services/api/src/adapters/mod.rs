pub mod advice_llm;
pub mod catalogue_file;
pub mod unconfigured;
pub mod vision_llm;

pub use advice_llm::OpenAiAdviceAdapter;
pub use catalogue_file::JsonCatalogueAdapter;
pub use unconfigured::UnconfiguredGateway;
pub use vision_llm::OpenAiVisionAdapter;
