mod sauce_orchestrator;

pub use sauce_orchestrator::SauceOrchestrator;
