/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint:

- `chat`: Interactive chat loop with session persistence
*/

pub mod chat;
