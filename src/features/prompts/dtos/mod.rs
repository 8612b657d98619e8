mod prompt_dto;

pub use prompt_dto::{
    BatchRemoveDto, CreatePromptDto, PromptQueryParams, PromptResponseDto, UpdatePromptDto,
};
