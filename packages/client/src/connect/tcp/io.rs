//! Deadline-bounded writes

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::connect::Deadline;
use crate::error;

/// Write and flush `bytes`, failing with `ReadTimeout` once `deadline` passes.
pub async fn write_all_by<W>(writer: &mut W, bytes: &[u8], deadline: Deadline) -> crate::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let write = async {
        writer.write_all(bytes).await?;
        writer.flush().await
    };

    match deadline.run(write).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(error::network(e)),
        Err(_) => Err(error::read_timeout()),
    }
}
