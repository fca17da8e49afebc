/**
 * Zenith Wellness Backend Library
 *
 * This crate implements the HTTP backend for the Zenith mental wellness
 * platform: an AI chat companion with multilingual support, community
 * peer support, crisis detection and resources, meditation tracking,
 * and spiritual content.
 *
 * # Architecture
 *
 * - `server` - Application state, configuration, and startup wiring
 * - `store` - Document store trait with Firestore and in-memory backends
 * - `ai` - Generative, translation, sentiment, and crisis adapters
 * - `auth` - JWT session issuing and account handlers
 * - `middleware` - Required and optional bearer-token extractors
 * - `chat`, `community`, `crisis`, `meditation`, `spiritual` - Feature
 *   endpoint handlers
 * - `routes` - Router assembly
 * - `error` - The shared API error type
 */

pub mod ai;
pub mod auth;
pub mod chat;
pub mod community;
pub mod crisis;
pub mod error;
pub mod meditation;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod spiritual;
pub mod store;
