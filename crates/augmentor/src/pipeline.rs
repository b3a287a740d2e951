use augmentor_image::PixelImage;

use crate::{error::AugmentError, operation::Operation};

/// An ordered sequence of operations applied to one image.
///
/// Each operation keeps its own gate, so every stage independently decides
/// whether it runs. The pipeline stops at the first failing stage.
///
/// # Example
///
/// ```
/// use augmentor::{
///     image::{Image, ImageSize},
///     FlipAxis, FlipOperation, InvertOperation, Operation, OperationConfig, Pipeline,
/// };
///
/// let mut pipeline = Pipeline::<Image<u8>>::new();
/// pipeline
///     .push(FlipOperation::new(FlipAxis::Horizontal, OperationConfig::default())?)
///     .push(InvertOperation::new(OperationConfig::default())?);
///
/// let size = ImageSize { width: 2, height: 1 };
/// let mut image = Image::<u8>::gray(size, vec![0, 200])?;
/// pipeline.perform(&mut image)?;
///
/// assert_eq!(image.as_slice(), &[55, 255]);
/// # Ok::<(), augmentor::AugmentError>(())
/// ```
pub struct Pipeline<I: PixelImage> {
    operations: Vec<Box<dyn Operation<I>>>,
}

impl<I: PixelImage> Default for Pipeline<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: PixelImage> Pipeline<I> {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// Append an operation.
    pub fn push<O>(&mut self, operation: O) -> &mut Self
    where
        O: Operation<I> + 'static,
    {
        self.operations.push(Box::new(operation));
        self
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the pipeline has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Names of the operations, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.operations.iter().map(|op| op.name()).collect()
    }
}

impl<I: PixelImage> Operation<I> for Pipeline<I> {
    fn perform<'a>(&mut self, image: &'a mut I) -> Result<&'a mut I, AugmentError> {
        for operation in self.operations.iter_mut() {
            if let Err(err) = operation.perform(&mut *image) {
                log::debug!("{} failed: {err}", operation.name());
                return Err(err);
            }
        }
        Ok(image)
    }

    fn name(&self) -> &'static str {
        "Pipeline"
    }
}
