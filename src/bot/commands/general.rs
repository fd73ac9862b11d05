//! General Discord commands - ping and help.
//! These don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Ajuda do Estoque**\n\
        Comandos disponíveis para gerenciar o estoque compartilhado.\n\n\
        • `/add <item> <quantity>` - Adiciona unidades de um item (cria o item se não existir).\n\
        • `/remove` - Escolha um item no menu e responda com a quantidade a remover (30 segundos).\n\
        • `/list` - Lista todos os itens do estoque.\n\
        • `/check <item>` - Mostra a quantidade de um item.\n\
        • `/ping` - Verifica se o bot está respondendo.\n\
        • `/help` - Mostra esta mensagem.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
