use anyhow::Result;
use clap::Args;
use igapi_client::identity::InstagramId;

#[derive(Args, Clone, Debug)]
pub struct ShortcodeArg {
    /// Media pk, or a media id of the form `{pk}_{user_id}`
    pub media_id: String,
    /// Print the web link instead of the bare shortcode
    #[arg(long)]
    pub link:     bool,
}

impl ShortcodeArg {
    pub fn run(self) -> Result<()> {
        let out = if self.link {
            InstagramId::weblink_from_media_id(&self.media_id)?
        } else {
            InstagramId::shorten_media_id(&self.media_id)?
        };
        println!("{out}");
        Ok(())
    }
}

#[derive(Args, Clone, Debug)]
pub struct ExpandArg {
    pub code: String,
}

impl ExpandArg {
    pub fn run(self) -> Result<()> {
        println!("{}", InstagramId::expand_code(&self.code)?);
        Ok(())
    }
}
