//! Bulk GraphQL client for the PokeAPI beta endpoint.
//!
//! One request pulls every Pokémon with the fields a [`Record`] needs:
//! English species name, national dex number, base stats, types and
//! abilities.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::PokeApiConfig;
use crate::provider::{DataProvider, FetchError};
use crate::types::Record;

const QUERY: &str = r#"
query AllPokemon($lang: Int!) {
  pokemon_v2_pokemon(order_by: {id: asc}) {
    id
    pokemon_v2_pokemonspecy {
      id
      pokemon_v2_pokemonspeciesnames(where: {language_id: {_eq: $lang}}) {
        name
      }
    }
    pokemon_v2_pokemonstats(order_by: {stat_id: asc}) {
      base_stat
    }
    pokemon_v2_pokemontypes(order_by: {slot: asc}) {
      pokemon_v2_type {
        name
      }
    }
    pokemon_v2_pokemonabilities(order_by: {slot: asc}) {
      pokemon_v2_ability {
        name
        pokemon_v2_abilitynames(where: {language_id: {_eq: $lang}}) {
          name
        }
      }
    }
  }
}
"#;

pub struct PokeApiProvider {
    client: Client,
    config: PokeApiConfig,
}

impl PokeApiProvider {
    pub fn new(config: PokeApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: PokeApiConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl DataProvider for PokeApiProvider {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        let body = serde_json::json!({
            "query": QUERY,
            "variables": { "lang": self.config.language_id },
        });

        let response: GraphQlResponse = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let records = response.into_records()?;
        debug!(records = records.len(), endpoint = %self.config.endpoint, "fetched pokemon");
        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<PokemonData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PokemonData {
    pokemon_v2_pokemon: Vec<RawPokemon>,
}

#[derive(Debug, Deserialize)]
struct RawPokemon {
    id: u32,
    pokemon_v2_pokemonspecy: RawSpecies,
    #[serde(default)]
    pokemon_v2_pokemonstats: Vec<RawStat>,
    #[serde(default)]
    pokemon_v2_pokemontypes: Vec<RawTypeSlot>,
    #[serde(default)]
    pokemon_v2_pokemonabilities: Vec<RawAbilitySlot>,
}

#[derive(Debug, Deserialize)]
struct RawSpecies {
    id: u32,
    pokemon_v2_pokemonspeciesnames: Vec<RawName>,
}

#[derive(Debug, Deserialize)]
struct RawName {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawStat {
    base_stat: u32,
}

#[derive(Debug, Deserialize)]
struct RawTypeSlot {
    pokemon_v2_type: RawNamed,
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawAbilitySlot {
    pokemon_v2_ability: RawAbility,
}

#[derive(Debug, Deserialize)]
struct RawAbility {
    name: String,
    #[serde(default)]
    pokemon_v2_abilitynames: Vec<RawName>,
}

impl GraphQlResponse {
    fn into_records(self) -> Result<Vec<Record>, FetchError> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(FetchError::Api(messages.join("; ")));
        }

        let data = self
            .data
            .ok_or_else(|| FetchError::Malformed("response has neither data nor errors".into()))?;

        data.pokemon_v2_pokemon.into_iter().map(RawPokemon::into_record).collect()
    }
}

impl RawPokemon {
    fn into_record(self) -> Result<Record, FetchError> {
        let species = self.pokemon_v2_pokemonspecy;
        let name = species
            .pokemon_v2_pokemonspeciesnames
            .into_iter()
            .next()
            .map(|n| n.name)
            .ok_or_else(|| FetchError::Malformed(format!("pokemon {} has no localized species name", self.id)))?;

        // Abilities without a localized name fall back to their slug.
        let abilities = self.pokemon_v2_pokemonabilities.into_iter().map(|slot| {
            let ability = slot.pokemon_v2_ability;
            ability
                .pokemon_v2_abilitynames
                .into_iter()
                .next()
                .map(|n| n.name)
                .unwrap_or(ability.name)
        });

        Ok(Record::new(self.id, name, species.id)
            .with_base_stats(self.pokemon_v2_pokemonstats.into_iter().map(|s| s.base_stat))
            .with_types(self.pokemon_v2_pokemontypes.into_iter().map(|t| t.pokemon_v2_type.name))
            .with_abilities(abilities))
    }
}
