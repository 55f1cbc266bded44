mod gate;
mod grant;
mod report;
mod resolve;

#[cfg(test)]
mod tests;

use addrole_framework::prelude::*;

use self::gate::ensure_outranks;

pub struct AddRoleArguments {
    pub role: String,
    pub targets: String,
}

impl FromArgs for AddRoleArguments {
    fn from_args(args: &mut Arguments) -> Result<Self, ArgumentError> {
        let role = args
            .next()
            .map(ToOwned::to_owned)
            .ok_or(ArgumentError::MissingArgument { name: "role" })?;
        let targets = args
            .rest()
            .ok_or(ArgumentError::MissingArgument { name: "targets" })?;
        Ok(Self { role, targets })
    }
}

pub async fn addrole(ctx: CommandContext, args: AddRoleArguments) -> CommandResult {
    let strategy = ctx.bot.config.strategy;
    let directory = &*ctx.bot.directory;

    let targets = strategy.normalize(&args.targets);
    if targets.is_empty() {
        return Err(CommandError::NoTargets(strategy).into());
    }

    let role = match parse_role(&args.role) {
        Some(role_id) => directory.role(ctx.guild_id, role_id).await?,
        None => None,
    };
    let role = role.ok_or_else(|| CommandError::UnknownRole(args.role.clone()))?;
    tracing::info!(guild = ?ctx.guild_id, "[ROLE] Target role: {} ({})", role.name, role.id);

    let author_position = ctx.author_position().await?;
    if let Err(err) = ensure_outranks(Principal::Actor, author_position, &role) {
        tracing::info!(guild = ?ctx.guild_id, "[PERMISSION] {} cannot assign {}", ctx.author_tag, role.name);
        return Err(err.into());
    }

    let bot_member = directory.member(ctx.guild_id, ctx.bot.bot_id).await?;
    if let Err(err) = ensure_outranks(Principal::Bot, bot_member.highest_position, &role) {
        tracing::info!(guild = ?ctx.guild_id, "[PERMISSION] Bot cannot assign {}", role.name);
        return Err(err.into());
    }

    let processing = ctx
        .respond()
        .content("Processing... Please wait.")?
        .exec()
        .await?;

    let resolutions = resolve::resolve(strategy, directory, ctx.guild_id, &targets).await?;
    let outcomes = grant::grant_all(directory, ctx.guild_id, &role, resolutions).await;

    let report = outcomes.render(&role.name);
    tracing::info!(guild = ?ctx.guild_id, "[RESULT] {}", report);

    for chunk in chunk_message(&report, ctx.bot.config.message_limit) {
        ctx.respond()
            .reply_to(processing)
            .content(chunk)?
            .exec()
            .await?;
    }

    Ok(())
}
