//! Report Builder
//! Turns the two datasets into the ordered sections of the ISA page.
//!
//! Building is a plain function of the loader cache and the config. Errors in
//! the table, ranking or summary stop the build where they happen; the map
//! section carries its own failure so the rest of the page survives it.

mod table;

pub use table::TableView;

use crate::charts::{ChoroplethMap, RankingChart};
use crate::config::ReportConfig;
use crate::data::{
    left_join, ColumnError, DataLoader, GeometryError, GeometryLoader, LoaderError, StateRecord,
};
use crate::stats::SummaryStats;
use thiserror::Error;

pub const PAGE_TITLE: &str = "Índice de Sustentabilidade Agrícola - Brasil 2023";

pub const INTRO: &str = "Este projeto apresenta o Índice de Sustentabilidade Agrícola (ISA) para cada estado brasileiro em 2023.\n\
O índice combina dados de vegetação nativa, uso de agrotóxicos, produtividade agrícola e eficiência de irrigação \
para avaliar o equilíbrio entre produção e preservação ambiental.\n\n\
Quanto mais próximo de 1, mais sustentável é o estado.";

pub const TABLE_HEADING: &str = "Dados Gerais por Estado";
pub const RANKING_HEADING: &str = "Ranking de Sustentabilidade (ISA por Estado)";
pub const SUMMARY_HEADING: &str = "Estatísticas Gerais";
pub const MAP_HEADING: &str = "Mapa de Calor da Sustentabilidade Agrícola";

pub const MAP_INTRO: &str = "O mapa abaixo mostra o nível de sustentabilidade agrícola por estado.\n\
Quanto mais escuro o tom de verde, maior o valor do ISA.";

pub const MAP_ERROR_PREFIX: &str = "Erro ao carregar o mapa";
pub const REMEDIATION_TITLE: &str = "Para visualizar o mapa, certifique-se de que:";
pub const REMEDIATION_HINTS: [&str; 3] = [
    "O arquivo 'brasil_estados.geojson' está na pasta do projeto",
    "O arquivo CSV está com a coluna 'Estado' correta",
    "Os nomes dos estados no CSV correspondem aos do GeoJSON",
];

pub const CONCLUSIONS_HEADING: &str = "Conclusões";
pub const CONCLUSIONS: [&str; 5] = [
    "Estados com maior vegetação nativa e melhor eficiência na irrigação tendem a alcançar melhores índices.",
    "O uso elevado de agrotóxicos ainda é o principal fator que reduz a sustentabilidade.",
    "A Região Sul geralmente apresenta alta produtividade com práticas relativamente sustentáveis.",
    "Já a Região Norte mantém altos níveis de vegetação, mas produtividade mais baixa.",
    "Incentivos a tecnologias agrícolas limpas e otimização de irrigação são caminhos promissores para elevar o ISA nacional.",
];

pub const FOOTER: &str =
    "Desenvolvido por Victor Henrique © 2025 | Projeto de Análise de Sustentabilidade Agrícola";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Column(#[from] ColumnError),
}

/// The map, or the message shown in its place.
#[derive(Debug, Clone, PartialEq)]
pub enum MapSection {
    Ready(ChoroplethMap),
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Table(TableView),
    Ranking(RankingChart),
    Summary(SummaryStats),
    Map(MapSection),
}

/// Sections in page order, up to the first fatal error.
#[derive(Debug)]
pub struct Report {
    pub sections: Vec<Section>,
    /// Set when a section failed outside the map boundary; nothing after it was built.
    pub halted: Option<ReportError>,
}

impl Report {
    /// Build the whole page. The primary CSV load goes through `loader`'s cache.
    pub fn build(loader: &mut DataLoader, config: &ReportConfig) -> Report {
        let mut sections = Vec::new();
        let halted = Self::build_sections(loader, config, &mut sections).err();

        if let Some(err) = &halted {
            log::error!("Report halted after {} section(s): {}", sections.len(), err);
        }

        Report { sections, halted }
    }

    fn build_sections(
        loader: &mut DataLoader,
        config: &ReportConfig,
        sections: &mut Vec<Section>,
    ) -> Result<(), ReportError> {
        let df = loader.load_csv(&config.csv_path)?;

        sections.push(Section::Table(TableView::from_dataframe(df)?));
        sections.push(Section::Ranking(RankingChart::from_dataframe(df)?));
        sections.push(Section::Summary(SummaryStats::from_dataframe(df)?));
        sections.push(Section::Map(Self::map_section(config)));

        Ok(())
    }

    /// Load, join and build the map in one failure boundary.
    pub fn map_section(config: &ReportConfig) -> MapSection {
        match Self::build_map(config) {
            Ok(map) => MapSection::Ready(map),
            Err(err) => {
                log::warn!("Map section failed: {}", err);
                MapSection::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    fn build_map(config: &ReportConfig) -> Result<ChoroplethMap, ReportError> {
        let df = DataLoader::read_csv(&config.csv_path)?;
        let geometries = GeometryLoader::load(&config.geojson_path)?;
        let states = StateRecord::from_dataframe(&df)?;
        let joined = left_join(geometries, &states);
        Ok(ChoroplethMap::from_joined(joined))
    }

    pub fn table(&self) -> Option<&TableView> {
        self.sections.iter().find_map(|s| match s {
            Section::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn ranking(&self) -> Option<&RankingChart> {
        self.sections.iter().find_map(|s| match s {
            Section::Ranking(r) => Some(r),
            _ => None,
        })
    }

    pub fn summary(&self) -> Option<&SummaryStats> {
        self.sections.iter().find_map(|s| match s {
            Section::Summary(s) => Some(s),
            _ => None,
        })
    }

    pub fn map(&self) -> Option<&MapSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Map(m) => Some(m),
            _ => None,
        })
    }
}
