//! Name source registry and factory.

use tracing::debug;

use crate::domain::errors::AlignmentOutcome;
use crate::domain::models::{AlignmentSource, Config};
use crate::domain::ports::NameSource;

use super::local::{ItisLocalSource, MycobankLocalSource};
use super::web::{
    CatalogOfLifeSource, PlantsOfTheWorldSource, TnrsSource, UnimplementedSource, WebClient,
};

/// Builds name sources from configuration.
pub struct SourceRegistry {
    config: Config,
}

impl SourceRegistry {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// The source selected by the policy configuration.
    pub fn create(&self) -> AlignmentOutcome<Box<dyn NameSource>> {
        self.create_by_type(self.config.policy.source)
    }

    /// Create a source by type. Local tables are read here, for the
    /// configured kingdom.
    pub fn create_by_type(&self, source: AlignmentSource) -> AlignmentOutcome<Box<dyn NameSource>> {
        let kingdom = self.config.policy.kingdom;
        debug!(source = source.as_str(), kingdom = %kingdom, "creating name source");

        let created: Box<dyn NameSource> = match source {
            AlignmentSource::ItisLocal => Box::new(ItisLocalSource::load(
                &self.config.reference.table_path(kingdom),
            )),
            AlignmentSource::MycobankLocal => Box::new(MycobankLocalSource::load(
                &self.config.reference.table_path(kingdom),
            )),
            AlignmentSource::CatalogOfLife => Box::new(CatalogOfLifeSource::new(
                self.web_client()?,
                &self.config.web.catalog_of_life,
                kingdom,
            )),
            AlignmentSource::Tnrs => Box::new(TnrsSource::new(
                self.web_client()?,
                &self.config.web.tnrs,
                self.config.policy.tnrs_cutoff(),
            )),
            AlignmentSource::PlantsOfTheWorld => Box::new(PlantsOfTheWorldSource::new(
                self.web_client()?,
                &self.config.web.plants_of_the_world,
                kingdom,
            )),
            AlignmentSource::ItisWeb | AlignmentSource::MycobankWeb => {
                Box::new(UnimplementedSource::new(source))
            }
        };
        Ok(created)
    }

    fn web_client(&self) -> AlignmentOutcome<WebClient> {
        WebClient::new(&self.config.web)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_every_source() {
        let registry = SourceRegistry::new(&Config::default());
        for source in AlignmentSource::ALL {
            let created = registry.create_by_type(source).unwrap();
            assert_eq!(created.name(), source.label());
        }
    }

    #[test]
    fn test_create_uses_configured_source() {
        let mut config = Config::default();
        config.policy.source = AlignmentSource::Tnrs;
        let created = SourceRegistry::new(&config).create().unwrap();
        assert_eq!(created.name(), "Taxonomic Name Resolution Service (web API)");
    }
}
